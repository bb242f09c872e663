//! Gauss coefficients of the IGRF main field, 1900 to 2010, plus the
//! 2010-2015 secular variation.
//!
//! Epochs 1900-1990 hold 120 coefficients (degree 10), 1995 onwards 195
//! (degree 13). The last 195 entries are the secular-variation terms.

#[rustfmt::skip]
pub(crate) static GH: [f64; 3255] = [
    -31543.0, -2298.0, 5922.0, -677.0, 2905.0, -1061.0, 924.0, 1121.0,
    1022.0, -1469.0, -330.0, 1256.0, 3.0, 572.0, 523.0, 876.0,
    628.0, 195.0, 660.0, -69.0, -361.0, -210.0, 134.0, -75.0,
    -184.0, 328.0, -210.0, 264.0, 53.0, 5.0, -33.0, -86.0,
    -124.0, -16.0, 3.0, 63.0, 61.0, -9.0, -11.0, 83.0,
    -217.0, 2.0, -58.0, -35.0, 59.0, 36.0, -90.0, -69.0,
    70.0, -55.0, -45.0, 0.0, -13.0, 34.0, -10.0, -41.0,
    -1.0, -21.0, 28.0, 18.0, -12.0, 6.0, -22.0, 11.0,
    8.0, 8.0, -4.0, -14.0, -9.0, 7.0, 1.0, -13.0,
    2.0, 5.0, -9.0, 16.0, 5.0, -5.0, 8.0, -18.0,
    8.0, 10.0, -20.0, 1.0, 14.0, -11.0, 5.0, 12.0,
    -3.0, 1.0, -2.0, -2.0, 8.0, 2.0, 10.0, -1.0,
    -2.0, -1.0, 2.0, -3.0, -4.0, 2.0, 2.0, 1.0,
    -5.0, 2.0, -2.0, 6.0, 6.0, -4.0, 4.0, 0.0,
    0.0, -2.0, 2.0, 4.0, 2.0, 0.0, 0.0, -6.0,
    -31464.0, -2298.0, 5909.0, -728.0, 2928.0, -1086.0, 1041.0, 1065.0,
    1037.0, -1494.0, -357.0, 1239.0, 34.0, 635.0, 480.0, 880.0,
    643.0, 203.0, 653.0, -77.0, -380.0, -201.0, 146.0, -65.0,
    -192.0, 328.0, -193.0, 259.0, 56.0, -1.0, -32.0, -93.0,
    -125.0, -26.0, 11.0, 62.0, 60.0, -7.0, -11.0, 86.0,
    -221.0, 4.0, -57.0, -32.0, 57.0, 32.0, -92.0, -67.0,
    70.0, -54.0, -46.0, 0.0, -14.0, 33.0, -11.0, -41.0,
    0.0, -20.0, 28.0, 18.0, -12.0, 6.0, -22.0, 11.0,
    8.0, 8.0, -4.0, -15.0, -9.0, 7.0, 1.0, -13.0,
    2.0, 5.0, -8.0, 16.0, 5.0, -5.0, 8.0, -18.0,
    8.0, 10.0, -20.0, 1.0, 14.0, -11.0, 5.0, 12.0,
    -3.0, 1.0, -2.0, -2.0, 8.0, 2.0, 10.0, 0.0,
    -2.0, -1.0, 2.0, -3.0, -4.0, 2.0, 2.0, 1.0,
    -5.0, 2.0, -2.0, 6.0, 6.0, -4.0, 4.0, 0.0,
    0.0, -2.0, 2.0, 4.0, 2.0, 0.0, 0.0, -6.0,
    -31354.0, -2297.0, 5898.0, -769.0, 2948.0, -1128.0, 1176.0, 1000.0,
    1058.0, -1524.0, -389.0, 1223.0, 62.0, 705.0, 425.0, 884.0,
    660.0, 211.0, 644.0, -90.0, -400.0, -189.0, 160.0, -55.0,
    -201.0, 327.0, -172.0, 253.0, 57.0, -9.0, -33.0, -102.0,
    -126.0, -38.0, 21.0, 62.0, 58.0, -5.0, -11.0, 89.0,
    -224.0, 5.0, -54.0, -29.0, 54.0, 28.0, -95.0, -65.0,
    71.0, -54.0, -47.0, 1.0, -14.0, 32.0, -12.0, -40.0,
    1.0, -19.0, 28.0, 18.0, -13.0, 6.0, -22.0, 11.0,
    8.0, 8.0, -4.0, -15.0, -9.0, 6.0, 1.0, -13.0,
    2.0, 5.0, -8.0, 16.0, 5.0, -5.0, 8.0, -18.0,
    8.0, 10.0, -20.0, 1.0, 14.0, -11.0, 5.0, 12.0,
    -3.0, 1.0, -2.0, -2.0, 8.0, 2.0, 10.0, 0.0,
    -2.0, -1.0, 2.0, -3.0, -4.0, 2.0, 2.0, 1.0,
    -5.0, 2.0, -2.0, 6.0, 6.0, -4.0, 4.0, 0.0,
    0.0, -2.0, 2.0, 4.0, 2.0, 0.0, 0.0, -6.0,
    -31212.0, -2306.0, 5875.0, -802.0, 2956.0, -1191.0, 1309.0, 917.0,
    1084.0, -1559.0, -421.0, 1212.0, 84.0, 778.0, 360.0, 887.0,
    678.0, 218.0, 631.0, -109.0, -416.0, -173.0, 178.0, -51.0,
    -211.0, 327.0, -148.0, 245.0, 58.0, -16.0, -34.0, -111.0,
    -126.0, -51.0, 32.0, 61.0, 57.0, -2.0, -10.0, 93.0,
    -228.0, 8.0, -51.0, -26.0, 49.0, 23.0, -98.0, -62.0,
    72.0, -54.0, -48.0, 2.0, -14.0, 31.0, -12.0, -38.0,
    2.0, -18.0, 28.0, 19.0, -15.0, 6.0, -22.0, 11.0,
    8.0, 8.0, -4.0, -15.0, -9.0, 6.0, 2.0, -13.0,
    3.0, 5.0, -8.0, 16.0, 6.0, -5.0, 8.0, -18.0,
    8.0, 10.0, -20.0, 1.0, 14.0, -11.0, 5.0, 12.0,
    -3.0, 1.0, -2.0, -2.0, 8.0, 2.0, 10.0, 0.0,
    -2.0, -1.0, 2.0, -3.0, -4.0, 2.0, 2.0, 1.0,
    -5.0, 2.0, -2.0, 6.0, 6.0, -4.0, 4.0, 0.0,
    0.0, -2.0, 1.0, 4.0, 2.0, 0.0, 0.0, -6.0,
    -31060.0, -2317.0, 5845.0, -839.0, 2959.0, -1259.0, 1407.0, 823.0,
    1111.0, -1600.0, -445.0, 1205.0, 103.0, 839.0, 293.0, 889.0,
    695.0, 220.0, 616.0, -134.0, -424.0, -153.0, 199.0, -57.0,
    -221.0, 326.0, -122.0, 236.0, 58.0, -23.0, -38.0, -119.0,
    -125.0, -62.0, 43.0, 61.0, 55.0, 0.0, -10.0, 96.0,
    -233.0, 11.0, -46.0, -22.0, 44.0, 18.0, -101.0, -57.0,
    73.0, -54.0, -49.0, 2.0, -14.0, 29.0, -13.0, -37.0,
    4.0, -16.0, 28.0, 19.0, -16.0, 6.0, -22.0, 11.0,
    7.0, 8.0, -3.0, -15.0, -9.0, 6.0, 2.0, -14.0,
    4.0, 5.0, -7.0, 17.0, 6.0, -5.0, 8.0, -19.0,
    8.0, 10.0, -20.0, 1.0, 14.0, -11.0, 5.0, 12.0,
    -3.0, 1.0, -2.0, -2.0, 9.0, 2.0, 10.0, 0.0,
    -2.0, -1.0, 2.0, -3.0, -4.0, 2.0, 2.0, 1.0,
    -5.0, 2.0, -2.0, 6.0, 6.0, -4.0, 4.0, 0.0,
    0.0, -2.0, 1.0, 4.0, 3.0, 0.0, 0.0, -6.0,
    -30926.0, -2318.0, 5817.0, -893.0, 2969.0, -1334.0, 1471.0, 728.0,
    1140.0, -1645.0, -462.0, 1202.0, 119.0, 881.0, 229.0, 891.0,
    711.0, 216.0, 601.0, -163.0, -426.0, -130.0, 217.0, -70.0,
    -230.0, 326.0, -96.0, 226.0, 58.0, -28.0, -44.0, -125.0,
    -122.0, -69.0, 51.0, 61.0, 54.0, 3.0, -9.0, 99.0,
    -238.0, 14.0, -40.0, -18.0, 39.0, 13.0, -103.0, -52.0,
    73.0, -54.0, -50.0, 3.0, -14.0, 27.0, -14.0, -35.0,
    5.0, -14.0, 29.0, 19.0, -17.0, 6.0, -21.0, 11.0,
    7.0, 8.0, -3.0, -15.0, -9.0, 6.0, 2.0, -14.0,
    4.0, 5.0, -7.0, 17.0, 7.0, -5.0, 8.0, -19.0,
    8.0, 10.0, -20.0, 1.0, 14.0, -11.0, 5.0, 12.0,
    -3.0, 1.0, -2.0, -2.0, 9.0, 2.0, 10.0, 0.0,
    -2.0, -1.0, 2.0, -3.0, -4.0, 2.0, 2.0, 1.0,
    -5.0, 2.0, -2.0, 6.0, 6.0, -4.0, 4.0, 0.0,
    0.0, -2.0, 1.0, 4.0, 3.0, 0.0, 0.0, -6.0,
    -30805.0, -2316.0, 5808.0, -951.0, 2980.0, -1424.0, 1517.0, 644.0,
    1172.0, -1692.0, -480.0, 1205.0, 133.0, 907.0, 166.0, 896.0,
    727.0, 205.0, 584.0, -195.0, -422.0, -109.0, 234.0, -90.0,
    -237.0, 327.0, -72.0, 218.0, 60.0, -32.0, -53.0, -131.0,
    -118.0, -74.0, 58.0, 60.0, 53.0, 4.0, -9.0, 102.0,
    -242.0, 19.0, -32.0, -16.0, 32.0, 8.0, -104.0, -46.0,
    74.0, -54.0, -51.0, 4.0, -15.0, 25.0, -14.0, -34.0,
    6.0, -12.0, 29.0, 18.0, -18.0, 6.0, -20.0, 11.0,
    7.0, 8.0, -3.0, -15.0, -9.0, 5.0, 2.0, -14.0,
    5.0, 5.0, -6.0, 18.0, 8.0, -5.0, 8.0, -19.0,
    8.0, 10.0, -20.0, 1.0, 14.0, -12.0, 5.0, 12.0,
    -3.0, 1.0, -2.0, -2.0, 9.0, 3.0, 10.0, 0.0,
    -2.0, -2.0, 2.0, -3.0, -4.0, 2.0, 2.0, 1.0,
    -5.0, 2.0, -2.0, 6.0, 6.0, -4.0, 4.0, 0.0,
    0.0, -2.0, 1.0, 4.0, 3.0, 0.0, 0.0, -6.0,
    -30715.0, -2306.0, 5812.0, -1018.0, 2984.0, -1520.0, 1550.0, 586.0,
    1206.0, -1740.0, -494.0, 1215.0, 146.0, 918.0, 101.0, 903.0,
    744.0, 188.0, 565.0, -226.0, -415.0, -90.0, 249.0, -114.0,
    -241.0, 329.0, -51.0, 211.0, 64.0, -33.0, -64.0, -136.0,
    -115.0, -76.0, 64.0, 59.0, 53.0, 4.0, -8.0, 104.0,
    -246.0, 25.0, -25.0, -15.0, 25.0, 4.0, -106.0, -40.0,
    74.0, -53.0, -52.0, 4.0, -17.0, 23.0, -14.0, -33.0,
    7.0, -11.0, 29.0, 18.0, -19.0, 6.0, -19.0, 11.0,
    7.0, 8.0, -3.0, -15.0, -9.0, 5.0, 1.0, -15.0,
    6.0, 5.0, -6.0, 18.0, 8.0, -5.0, 7.0, -19.0,
    8.0, 10.0, -20.0, 1.0, 15.0, -12.0, 5.0, 11.0,
    -3.0, 1.0, -3.0, -2.0, 9.0, 3.0, 11.0, 0.0,
    -2.0, -2.0, 2.0, -3.0, -4.0, 2.0, 2.0, 1.0,
    -5.0, 2.0, -2.0, 6.0, 6.0, -4.0, 4.0, 0.0,
    0.0, -1.0, 2.0, 4.0, 3.0, 0.0, 0.0, -6.0,
    -30654.0, -2292.0, 5821.0, -1106.0, 2981.0, -1614.0, 1566.0, 528.0,
    1240.0, -1790.0, -499.0, 1232.0, 163.0, 916.0, 43.0, 914.0,
    762.0, 169.0, 550.0, -252.0, -405.0, -72.0, 265.0, -141.0,
    -241.0, 334.0, -33.0, 208.0, 71.0, -33.0, -75.0, -141.0,
    -113.0, -76.0, 69.0, 57.0, 54.0, 4.0, -7.0, 105.0,
    -249.0, 33.0, -18.0, -15.0, 18.0, 0.0, -107.0, -33.0,
    74.0, -53.0, -52.0, 4.0, -18.0, 20.0, -14.0, -31.0,
    7.0, -9.0, 29.0, 17.0, -20.0, 5.0, -19.0, 11.0,
    7.0, 8.0, -3.0, -14.0, -10.0, 5.0, 1.0, -15.0,
    6.0, 5.0, -5.0, 19.0, 9.0, -5.0, 7.0, -19.0,
    8.0, 10.0, -21.0, 1.0, 15.0, -12.0, 5.0, 11.0,
    -3.0, 1.0, -3.0, -2.0, 9.0, 3.0, 11.0, 1.0,
    -2.0, -2.0, 2.0, -3.0, -4.0, 2.0, 2.0, 1.0,
    -5.0, 2.0, -2.0, 6.0, 6.0, -4.0, 4.0, 0.0,
    0.0, -1.0, 2.0, 4.0, 3.0, 0.0, 0.0, -6.0,
    -30594.0, -2285.0, 5810.0, -1244.0, 2990.0, -1702.0, 1578.0, 477.0,
    1282.0, -1834.0, -499.0, 1255.0, 186.0, 913.0, -11.0, 944.0,
    776.0, 144.0, 544.0, -276.0, -421.0, -55.0, 304.0, -178.0,
    -253.0, 346.0, -12.0, 194.0, 95.0, -20.0, -67.0, -142.0,
    -119.0, -82.0, 82.0, 59.0, 57.0, 6.0, 6.0, 100.0,
    -246.0, 16.0, -25.0, -9.0, 21.0, -16.0, -104.0, -39.0,
    70.0, -40.0, -45.0, 0.0, -18.0, 0.0, 2.0, -29.0,
    6.0, -10.0, 28.0, 15.0, -17.0, 29.0, -22.0, 13.0,
    7.0, 12.0, -8.0, -21.0, -5.0, -12.0, 9.0, -7.0,
    7.0, 2.0, -10.0, 18.0, 7.0, 3.0, 2.0, -11.0,
    5.0, -21.0, -27.0, 1.0, 17.0, -11.0, 29.0, 3.0,
    -9.0, 16.0, 4.0, -3.0, 9.0, -4.0, 6.0, -3.0,
    1.0, -4.0, 8.0, -3.0, 11.0, 5.0, 1.0, 1.0,
    2.0, -20.0, -5.0, -1.0, -1.0, -6.0, 8.0, 6.0,
    -1.0, -4.0, -3.0, -2.0, 5.0, 0.0, -2.0, -2.0,
    -30554.0, -2250.0, 5815.0, -1341.0, 2998.0, -1810.0, 1576.0, 381.0,
    1297.0, -1889.0, -476.0, 1274.0, 206.0, 896.0, -46.0, 954.0,
    792.0, 136.0, 528.0, -278.0, -408.0, -37.0, 303.0, -210.0,
    -240.0, 349.0, 3.0, 211.0, 103.0, -20.0, -87.0, -147.0,
    -122.0, -76.0, 80.0, 54.0, 57.0, -1.0, 4.0, 99.0,
    -247.0, 33.0, -16.0, -12.0, 12.0, -12.0, -105.0, -30.0,
    65.0, -55.0, -35.0, 2.0, -17.0, 1.0, 0.0, -40.0,
    10.0, -7.0, 36.0, 5.0, -18.0, 19.0, -16.0, 22.0,
    15.0, 5.0, -4.0, -22.0, -1.0, 0.0, 11.0, -21.0,
    15.0, -8.0, -13.0, 17.0, 5.0, -4.0, -1.0, -17.0,
    3.0, -7.0, -24.0, -1.0, 19.0, -25.0, 12.0, 10.0,
    2.0, 5.0, 2.0, -5.0, 8.0, -2.0, 8.0, 3.0,
    -11.0, 8.0, -7.0, -8.0, 4.0, 13.0, -1.0, -2.0,
    13.0, -10.0, -4.0, 2.0, 4.0, -3.0, 12.0, 6.0,
    3.0, -3.0, 2.0, 6.0, 10.0, 11.0, 3.0, 8.0,
    -30500.0, -2215.0, 5820.0, -1440.0, 3003.0, -1898.0, 1581.0, 291.0,
    1302.0, -1944.0, -462.0, 1288.0, 216.0, 882.0, -83.0, 958.0,
    796.0, 133.0, 510.0, -274.0, -397.0, -23.0, 290.0, -230.0,
    -229.0, 360.0, 15.0, 230.0, 110.0, -23.0, -98.0, -152.0,
    -121.0, -69.0, 78.0, 47.0, 57.0, -9.0, 3.0, 96.0,
    -247.0, 48.0, -8.0, -16.0, 7.0, -12.0, -107.0, -24.0,
    65.0, -56.0, -50.0, 2.0, -24.0, 10.0, -4.0, -32.0,
    8.0, -11.0, 28.0, 9.0, -20.0, 18.0, -18.0, 11.0,
    9.0, 10.0, -6.0, -15.0, -14.0, 5.0, 6.0, -23.0,
    10.0, 3.0, -7.0, 23.0, 6.0, -4.0, 9.0, -13.0,
    4.0, 9.0, -11.0, -4.0, 12.0, -5.0, 7.0, 2.0,
    6.0, 4.0, -2.0, 1.0, 10.0, 2.0, 7.0, 2.0,
    -6.0, 5.0, 5.0, -3.0, -5.0, -4.0, -1.0, 0.0,
    2.0, -8.0, -3.0, -2.0, 7.0, -4.0, 4.0, 1.0,
    -2.0, -3.0, 6.0, 7.0, -2.0, -1.0, 0.0, -3.0,
    -30421.0, -2169.0, 5791.0, -1555.0, 3002.0, -1967.0, 1590.0, 206.0,
    1302.0, -1992.0, -414.0, 1289.0, 224.0, 878.0, -130.0, 957.0,
    800.0, 135.0, 504.0, -278.0, -394.0, 3.0, 269.0, -255.0,
    -222.0, 362.0, 16.0, 242.0, 125.0, -26.0, -117.0, -156.0,
    -114.0, -63.0, 81.0, 46.0, 58.0, -10.0, 1.0, 99.0,
    -237.0, 60.0, -1.0, -20.0, -2.0, -11.0, -113.0, -17.0,
    67.0, -56.0, -55.0, 5.0, -28.0, 15.0, -6.0, -32.0,
    7.0, -7.0, 23.0, 17.0, -18.0, 8.0, -17.0, 15.0,
    6.0, 11.0, -4.0, -14.0, -11.0, 7.0, 2.0, -18.0,
    10.0, 4.0, -5.0, 23.0, 10.0, 1.0, 8.0, -20.0,
    4.0, 6.0, -18.0, 0.0, 12.0, -9.0, 2.0, 1.0,
    0.0, 4.0, -3.0, -1.0, 9.0, -2.0, 8.0, 3.0,
    0.0, -1.0, 5.0, 1.0, -3.0, 4.0, 4.0, 1.0,
    0.0, 0.0, -1.0, 2.0, 4.0, -5.0, 6.0, 1.0,
    1.0, -1.0, -1.0, 6.0, 2.0, 0.0, 0.0, -7.0,
    -30334.0, -2119.0, 5776.0, -1662.0, 2997.0, -2016.0, 1594.0, 114.0,
    1297.0, -2038.0, -404.0, 1292.0, 240.0, 856.0, -165.0, 957.0,
    804.0, 148.0, 479.0, -269.0, -390.0, 13.0, 252.0, -269.0,
    -219.0, 358.0, 19.0, 254.0, 128.0, -31.0, -126.0, -157.0,
    -97.0, -62.0, 81.0, 45.0, 61.0, -11.0, 8.0, 100.0,
    -228.0, 68.0, 4.0, -32.0, 1.0, -8.0, -111.0, -7.0,
    75.0, -57.0, -61.0, 4.0, -27.0, 13.0, -2.0, -26.0,
    6.0, -6.0, 26.0, 13.0, -23.0, 1.0, -12.0, 13.0,
    5.0, 7.0, -4.0, -12.0, -14.0, 9.0, 0.0, -16.0,
    8.0, 4.0, -1.0, 24.0, 11.0, -3.0, 4.0, -17.0,
    8.0, 10.0, -22.0, 2.0, 15.0, -13.0, 7.0, 10.0,
    -4.0, -1.0, -5.0, -1.0, 10.0, 5.0, 10.0, 1.0,
    -4.0, -2.0, 1.0, -2.0, -3.0, 2.0, 2.0, 1.0,
    -5.0, 2.0, -2.0, 6.0, 4.0, -4.0, 4.0, 0.0,
    0.0, -2.0, 2.0, 3.0, 2.0, 0.0, 0.0, -6.0,
    -30220.0, -2068.0, 5737.0, -1781.0, 3000.0, -2047.0, 1611.0, 25.0,
    1287.0, -2091.0, -366.0, 1278.0, 251.0, 838.0, -196.0, 952.0,
    800.0, 167.0, 461.0, -266.0, -395.0, 26.0, 234.0, -279.0,
    -216.0, 359.0, 26.0, 262.0, 139.0, -42.0, -139.0, -160.0,
    -91.0, -56.0, 83.0, 43.0, 64.0, -12.0, 15.0, 100.0,
    -212.0, 72.0, 2.0, -37.0, 3.0, -6.0, -112.0, 1.0,
    72.0, -57.0, -70.0, 1.0, -27.0, 14.0, -4.0, -22.0,
    8.0, -2.0, 23.0, 13.0, -23.0, -2.0, -11.0, 14.0,
    6.0, 7.0, -2.0, -15.0, -13.0, 6.0, -3.0, -17.0,
    5.0, 6.0, 0.0, 21.0, 11.0, -6.0, 3.0, -16.0,
    8.0, 10.0, -21.0, 2.0, 16.0, -12.0, 6.0, 10.0,
    -4.0, -1.0, -5.0, 0.0, 10.0, 3.0, 11.0, 1.0,
    -2.0, -1.0, 1.0, -3.0, -3.0, 1.0, 2.0, 1.0,
    -5.0, 3.0, -1.0, 4.0, 6.0, -4.0, 4.0, 0.0,
    1.0, -1.0, 0.0, 3.0, 3.0, 1.0, -1.0, -4.0,
    -30100.0, -2013.0, 5675.0, -1902.0, 3010.0, -2067.0, 1632.0, -68.0,
    1276.0, -2144.0, -333.0, 1260.0, 262.0, 830.0, -223.0, 946.0,
    791.0, 191.0, 438.0, -265.0, -405.0, 39.0, 216.0, -288.0,
    -218.0, 356.0, 31.0, 264.0, 148.0, -59.0, -152.0, -159.0,
    -83.0, -49.0, 88.0, 45.0, 66.0, -13.0, 28.0, 99.0,
    -198.0, 75.0, 1.0, -41.0, 6.0, -4.0, -111.0, 11.0,
    71.0, -56.0, -77.0, 1.0, -26.0, 16.0, -5.0, -14.0,
    10.0, 0.0, 22.0, 12.0, -23.0, -5.0, -12.0, 14.0,
    6.0, 6.0, -1.0, -16.0, -12.0, 4.0, -8.0, -19.0,
    4.0, 6.0, 0.0, 18.0, 10.0, -10.0, 1.0, -17.0,
    7.0, 10.0, -21.0, 2.0, 16.0, -12.0, 7.0, 10.0,
    -4.0, -1.0, -5.0, -1.0, 10.0, 4.0, 11.0, 1.0,
    -3.0, -2.0, 1.0, -3.0, -3.0, 1.0, 2.0, 1.0,
    -5.0, 3.0, -2.0, 4.0, 5.0, -4.0, 4.0, -1.0,
    1.0, -1.0, 0.0, 3.0, 3.0, 1.0, -1.0, -5.0,
    -29992.0, -1956.0, 5604.0, -1997.0, 3027.0, -2129.0, 1663.0, -200.0,
    1281.0, -2180.0, -336.0, 1251.0, 271.0, 833.0, -252.0, 938.0,
    782.0, 212.0, 398.0, -257.0, -419.0, 53.0, 199.0, -297.0,
    -218.0, 357.0, 46.0, 261.0, 150.0, -74.0, -151.0, -162.0,
    -78.0, -48.0, 92.0, 48.0, 66.0, -15.0, 42.0, 93.0,
    -192.0, 71.0, 4.0, -43.0, 14.0, -2.0, -108.0, 17.0,
    72.0, -59.0, -82.0, 2.0, -27.0, 21.0, -5.0, -12.0,
    16.0, 1.0, 18.0, 11.0, -23.0, -2.0, -10.0, 18.0,
    6.0, 7.0, 0.0, -18.0, -11.0, 4.0, -7.0, -22.0,
    4.0, 9.0, 3.0, 16.0, 6.0, -13.0, -1.0, -15.0,
    5.0, 10.0, -21.0, 1.0, 16.0, -12.0, 9.0, 9.0,
    -5.0, -3.0, -6.0, -1.0, 9.0, 7.0, 10.0, 2.0,
    -6.0, -5.0, 2.0, -4.0, -4.0, 1.0, 2.0, 0.0,
    -5.0, 3.0, -2.0, 6.0, 5.0, -4.0, 3.0, 0.0,
    1.0, -1.0, 2.0, 4.0, 3.0, 0.0, 0.0, -6.0,
    -29873.0, -1905.0, 5500.0, -2072.0, 3044.0, -2197.0, 1687.0, -306.0,
    1296.0, -2208.0, -310.0, 1247.0, 284.0, 829.0, -297.0, 936.0,
    780.0, 232.0, 361.0, -249.0, -424.0, 69.0, 170.0, -297.0,
    -214.0, 355.0, 47.0, 253.0, 150.0, -93.0, -154.0, -164.0,
    -75.0, -46.0, 95.0, 53.0, 65.0, -16.0, 51.0, 88.0,
    -185.0, 69.0, 4.0, -48.0, 16.0, -1.0, -102.0, 21.0,
    74.0, -62.0, -83.0, 3.0, -27.0, 24.0, -2.0, -6.0,
    20.0, 4.0, 17.0, 10.0, -23.0, 0.0, -7.0, 21.0,
    6.0, 8.0, 0.0, -19.0, -11.0, 5.0, -9.0, -23.0,
    4.0, 11.0, 4.0, 14.0, 4.0, -15.0, -4.0, -11.0,
    5.0, 10.0, -21.0, 1.0, 15.0, -12.0, 9.0, 9.0,
    -6.0, -3.0, -6.0, -1.0, 9.0, 7.0, 9.0, 1.0,
    -7.0, -5.0, 2.0, -4.0, -4.0, 1.0, 3.0, 0.0,
    -5.0, 3.0, -2.0, 6.0, 5.0, -4.0, 3.0, 0.0,
    1.0, -1.0, 2.0, 4.0, 3.0, 0.0, 0.0, -6.0,
    -29775.0, -1848.0, 5406.0, -2131.0, 3059.0, -2279.0, 1686.0, -373.0,
    1314.0, -2239.0, -284.0, 1248.0, 293.0, 802.0, -352.0, 939.0,
    780.0, 247.0, 325.0, -240.0, -423.0, 84.0, 141.0, -299.0,
    -214.0, 353.0, 46.0, 245.0, 154.0, -109.0, -153.0, -165.0,
    -69.0, -36.0, 97.0, 61.0, 65.0, -16.0, 59.0, 82.0,
    -178.0, 69.0, 3.0, -52.0, 18.0, 1.0, -96.0, 24.0,
    77.0, -64.0, -80.0, 2.0, -26.0, 26.0, 0.0, -1.0,
    21.0, 5.0, 17.0, 9.0, -23.0, 0.0, -4.0, 23.0,
    5.0, 10.0, -1.0, -19.0, -10.0, 6.0, -12.0, -22.0,
    3.0, 12.0, 4.0, 12.0, 2.0, -16.0, -6.0, -10.0,
    4.0, 9.0, -20.0, 1.0, 15.0, -12.0, 11.0, 9.0,
    -7.0, -4.0, -7.0, -2.0, 9.0, 7.0, 8.0, 1.0,
    -7.0, -6.0, 2.0, -3.0, -4.0, 2.0, 2.0, 1.0,
    -5.0, 3.0, -2.0, 6.0, 4.0, -4.0, 3.0, 0.0,
    1.0, -2.0, 3.0, 3.0, 3.0, -1.0, 0.0, -6.0,
    -29692.0, -1784.0, 5306.0, -2200.0, 3070.0, -2366.0, 1681.0, -413.0,
    1335.0, -2267.0, -262.0, 1249.0, 302.0, 759.0, -427.0, 940.0,
    780.0, 262.0, 290.0, -236.0, -418.0, 97.0, 122.0, -306.0,
    -214.0, 352.0, 46.0, 235.0, 165.0, -118.0, -143.0, -166.0,
    -55.0, -17.0, 107.0, 68.0, 67.0, -17.0, 68.0, 72.0,
    -170.0, 67.0, -1.0, -58.0, 19.0, 1.0, -93.0, 36.0,
    77.0, -72.0, -69.0, 1.0, -25.0, 28.0, 4.0, 5.0,
    24.0, 4.0, 17.0, 8.0, -24.0, -2.0, -6.0, 25.0,
    6.0, 11.0, -6.0, -21.0, -9.0, 8.0, -14.0, -23.0,
    9.0, 15.0, 6.0, 11.0, -5.0, -16.0, -7.0, -4.0,
    4.0, 9.0, -20.0, 3.0, 15.0, -10.0, 12.0, 8.0,
    -6.0, -8.0, -8.0, -1.0, 8.0, 10.0, 5.0, -2.0,
    -8.0, -8.0, 3.0, -3.0, -6.0, 1.0, 2.0, 0.0,
    -4.0, 4.0, -1.0, 5.0, 4.0, -5.0, 2.0, -1.0,
    2.0, -2.0, 5.0, 1.0, 1.0, -2.0, 0.0, -7.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, -29619.4, -1728.2, 5186.1, -2267.7, 3068.4,
    -2481.6, 1670.9, -458.0, 1339.6, -2288.0, -227.6, 1252.1, 293.4,
    714.5, -491.1, 932.3, 786.8, 272.6, 250.0, -231.9, -403.0,
    119.8, 111.3, -303.8, -218.8, 351.4, 43.8, 222.3, 171.9,
    -130.4, -133.1, -168.6, -39.3, -12.9, 106.3, 72.3, 68.2,
    -17.4, 74.2, 63.7, -160.9, 65.1, -5.9, -61.2, 16.9,
    0.7, -90.4, 43.8, 79.0, -74.0, -64.6, 0.0, -24.2,
    33.3, 6.2, 9.1, 24.0, 6.9, 14.8, 7.3, -25.4,
    -1.2, -5.8, 24.4, 6.6, 11.9, -9.2, -21.5, -7.9,
    8.5, -16.6, -21.5, 9.1, 15.5, 7.0, 8.9, -7.9,
    -14.9, -7.0, -2.1, 5.0, 9.4, -19.7, 3.0, 13.4,
    -8.4, 12.5, 6.3, -6.2, -8.9, -8.4, -1.5, 8.4,
    9.3, 3.8, -4.3, -8.2, -8.2, 4.8, -2.6, -6.0,
    1.7, 1.7, 0.0, -3.1, 4.0, -0.5, 4.9, 3.7,
    -5.9, 1.0, -1.2, 2.0, -2.9, 4.2, 0.2, 0.3,
    -2.2, -1.1, -7.4, 2.7, -1.7, 0.1, -1.9, 1.3,
    1.5, -0.9, -0.1, -2.6, 0.1, 0.9, -0.7, -0.7,
    0.7, -2.8, 1.7, -0.9, 0.1, -1.2, 1.2, -1.9,
    4.0, -0.9, -2.2, -0.3, -0.4, 0.2, 0.3, 0.9,
    2.5, -0.2, -2.6, 0.9, 0.7, -0.5, 0.3, 0.3,
    0.0, -0.3, 0.0, -0.4, 0.3, -0.1, -0.9, -0.2,
    -0.4, -0.4, 0.8, -0.2, -0.9, -0.9, 0.3, 0.2,
    0.1, 1.8, -0.4, -0.4, 1.3, -1.0, -0.4, -0.1,
    0.7, 0.7, -0.4, 0.3, 0.3, 0.6, -0.1, 0.3,
    0.4, -0.2, 0.0, -0.5, 0.1, -0.9, -29554.63, -1669.05,
    5077.99, -2337.24, 3047.69, -2594.50, 1657.76, -515.43, 1336.30, -2305.83,
    -198.86, 1246.39, 269.72, 672.51, -524.72, 920.55, 797.96, 282.07,
    210.65, -225.23, -379.86, 145.15, 100.00, -305.36, -227.00, 354.41,
    42.72, 208.95, 180.25, -136.54, -123.45, -168.05, -19.57, -13.55,
    103.85, 73.60, 69.56, -20.33, 76.74, 54.75, -151.34, 63.63,
    -14.58, -63.53, 14.58, 0.24, -86.36, 50.94, 79.88, -74.46,
    -61.14, -1.65, -22.57, 38.73, 6.82, 12.30, 25.35, 9.37,
    10.93, 5.42, -26.32, 1.94, -4.64, 24.80, 7.62, 11.20,
    -11.73, -20.88, -6.88, 9.83, -18.11, -19.71, 10.17, 16.22,
    9.36, 7.61, -11.25, -12.76, -4.87, -0.06, 5.58, 9.76,
    -20.11, 3.58, 12.69, -6.94, 12.67, 5.01, -6.72, -10.76,
    -8.16, -1.25, 8.10, 8.76, 2.92, -6.66, -7.73, -9.22,
    6.01, -2.17, -6.12, 2.19, 1.42, 0.10, -2.35, 4.46,
    -0.15, 4.76, 3.06, -6.58, 0.29, -1.01, 2.06, -3.47,
    3.77, -0.86, -0.21, -2.31, -2.09, -7.93, 2.95, -1.60,
    0.26, -1.88, 1.44, 1.44, -0.77, -0.31, -2.27, 0.29,
    0.90, -0.79, -0.58, 0.53, -2.69, 1.80, -1.08, 0.16,
    -1.58, 0.96, -1.90, 3.99, -1.39, -2.15, -0.29, -0.55,
    0.21, 0.23, 0.89, 2.38, -0.38, -2.63, 0.96, 0.61,
    -0.30, 0.40, 0.46, 0.01, -0.35, 0.02, -0.36, 0.28,
    0.08, -0.87, -0.49, -0.34, -0.08, 0.88, -0.16, -0.88,
    -0.76, 0.30, 0.33, 0.28, 1.72, -0.43, -0.54, 1.18,
    -1.07, -0.37, -0.04, 0.75, 0.63, -0.26, 0.21, 0.35,
    0.53, -0.05, 0.38, 0.41, -0.22, -0.10, -0.57, -0.18,
    -0.82, -29496.5, -1585.9, 4945.1, -2396.6, 3026.0, -2707.7, 1668.6,
    -575.4, 1339.7, -2326.3, -160.5, 1231.7, 251.7, 634.2, -536.8,
    912.6, 809.0, 286.4, 166.6, -211.2, -357.1, 164.4, 89.7,
    -309.2, -231.1, 357.2, 44.7, 200.3, 188.9, -141.2, -118.1,
    -163.1, 0.1, -7.7, 100.9, 72.8, 68.6, -20.8, 76.0,
    44.2, -141.4, 61.5, -22.9, -66.3, 13.1, 3.1, -77.9,
    54.9, 80.4, -75.0, -57.8, -4.7, -21.2, 45.3, 6.6,
    14.0, 24.9, 10.4, 7.0, 1.6, -27.7, 4.9, -3.4,
    24.3, 8.2, 10.9, -14.5, -20.0, -5.7, 11.9, -19.3,
    -17.4, 11.6, 16.7, 10.9, 7.1, -14.1, -10.8, -3.7,
    1.7, 5.4, 9.4, -20.5, 3.4, 11.6, -5.3, 12.8,
    3.1, -7.2, -12.4, -7.4, -0.8, 8.0, 8.4, 2.2,
    -8.4, -6.1, -10.1, 7.0, -2.0, -6.3, 2.8, 0.9,
    -0.1, -1.1, 4.7, -0.2, 4.4, 2.5, -7.2, -0.3,
    -1.0, 2.2, -4.0, 3.1, -2.0, -1.0, -2.0, -2.8,
    -8.3, 3.0, -1.5, 0.1, -2.1, 1.7, 1.6, -0.6,
    -0.5, -1.8, 0.5, 0.9, -0.8, -0.4, 0.4, -2.5,
    1.8, -1.3, 0.2, -2.1, 0.8, -1.9, 3.8, -1.8,
    -2.1, -0.2, -0.8, 0.3, 0.3, 1.0, 2.2, -0.7,
    -2.5, 0.9, 0.5, -0.1, 0.6, 0.5, 0.0, -0.4,
    0.1, -0.4, 0.3, 0.2, -0.9, -0.8, -0.2, 0.0,
    0.8, -0.2, -0.9, -0.8, 0.3, 0.3, 0.4, 1.7,
    -0.4, -0.6, 1.1, -1.2, -0.3, -0.1, 0.8, 0.5,
    -0.2, 0.1, 0.4, 0.5, 0.0, 0.4, 0.4, -0.2,
    -0.3, -0.5, -0.3, -0.8, 11.4, 16.7, -28.8, -11.3,
    -3.9, -23.0, 2.7, -12.9, 1.3, -3.9, 8.6, -2.9,
    -2.9, -8.1, -2.1, -1.4, 2.0, 0.4, -8.9, 3.2,
    4.4, 3.6, -2.3, -0.8, -0.5, 0.5, 0.5, -1.5,
    1.5, -0.7, 0.9, 1.3, 3.7, 1.4, -0.6, -0.3,
    -0.3, -0.1, -0.3, -2.1, 1.9, -0.4, -1.6, -0.5,
    -0.2, 0.8, 1.8, 0.5, 0.2, -0.1, 0.6, -0.6,
    0.3, 1.4, -0.2, 0.3, -0.1, 0.1, -0.8, -0.8,
    -0.3, 0.4, 0.2, -0.1, 0.1, 0.0, -0.5, 0.2,
    0.3, 0.5, -0.3, 0.4, 0.3, 0.1, 0.2, -0.1,
    -0.5, 0.4, 0.2, 0.4, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
];
